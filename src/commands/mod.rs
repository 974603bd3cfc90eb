pub mod config_commands;
pub mod profile_commands;
pub mod server_commands;
pub mod wordpress_commands;

// 重新导出所有命令函数
pub use config_commands::*;
pub use profile_commands::*;
pub use server_commands::*;
pub use wordpress_commands::*;
