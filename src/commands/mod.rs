mod generate;
mod init;
mod validate;

pub use generate::run_generate;
pub use init::run_init;
pub use validate::run_validate;
