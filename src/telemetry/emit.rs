use anyhow::Result;
use serde::Serialize;

use crate::output::types::{Envelope, Meta};
use crate::output::{Emitter, OutputConfig};

pub fn print_result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<()> {
    let env = Envelope::result(op, result, meta)?;
    Emitter::new(OutputConfig::from_env()).emit(&env)?;
    Ok(())
}
