#[macro_use]
extern crate quickcheck_macros;

#[path = "../../src/test/logging.rs"]
mod logging;
#[path = "../../src/test/quick.rs"]
mod quick;

mod redblack;

pub(crate) use logging::init_logging;
pub(crate) use quick::Op;
