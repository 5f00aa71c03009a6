use std::convert::Infallible;

use sarge::ArgumentType;

use crate::cli::OutputArgs;

impl ArgumentType for OutputArgs {
    type Error = Infallible;

    const REPEATABLE: bool = true;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        match val {
            None => Some(Ok(OutputArgs::new().with_output("-"))),
            Some(v) => Some(Ok(OutputArgs::parse_list(v))),
        }
    }

    fn default_value() -> Option<Self> {
        Some(OutputArgs::default())
    }
}
