pub mod bulk;
pub mod dispatch;
pub mod import;
pub mod init;
pub mod participation;
pub mod schema;
pub mod validate;
