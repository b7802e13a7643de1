//! Command-line and environment configuration for the server binary.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use todo_core::WriteMode;

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server")]
#[command(about = "HTTP API for a todo list persisted to a JSON file")]
#[command(version)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "TODO_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// JSON file holding the todo list, created on first write
    #[arg(long, env = "TODO_DATA_FILE", default_value = "todos.json")]
    pub data_file: PathBuf,

    /// Write through a temp file and rename instead of overwriting in place
    #[arg(long, env = "TODO_ATOMIC_WRITES")]
    pub atomic_writes: bool,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.atomic_writes {
            WriteMode::AtomicRename
        } else {
            WriteMode::Overwrite
        }
    }
}
