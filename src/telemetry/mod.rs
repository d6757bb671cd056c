pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

pub fn fetch() -> LogCtx<ops::fetch::Fetch> { LogCtx::new(config::logs_are_json()) }
pub fn list() -> LogCtx<ops::list::List> { LogCtx::new(config::logs_are_json()) }
pub fn generate() -> LogCtx<ops::generate::Generate> { LogCtx::new(config::logs_are_json()) }
pub fn init() -> LogCtx<ops::init::Init> { LogCtx::new(config::logs_are_json()) }
