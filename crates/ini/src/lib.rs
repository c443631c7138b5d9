//! Layered INI configuration store.
//!
//! This crate parses INI text into sections of scalar and array values,
//! resolves reads against environment-variable overrides, expands templates
//! on request, and writes the store back out in a deterministic order.
//!
//! ```
//! use envini::{IniFile, MapEnv};
//!
//! let mut file: IniFile = "[db]\nhost = localhost\nreplica[] = a\nreplica[] = b\n"
//!     .parse()
//!     .unwrap();
//! file.set_env(MapEnv::new().with_var("APP_DB_HOST", "db.prod"));
//! file.enable_env_overrides("APP");
//!
//! assert_eq!(file.get("db", "host").as_deref(), Some("db.prod"));
//! assert_eq!(file.get_arr("db", "replica").unwrap(), vec!["a", "b"]);
//! ```

pub mod env;
pub mod error;
mod file;
mod loader;
pub mod lookup;
pub mod parser;
pub mod resolver;
mod section;
mod serializer;
pub mod template;

pub use env::{EnvSource, MapEnv, ProcessEnv, binding_name, load_dotenv};
pub use error::{IniError, SubstitutionError, SyntaxError};
pub use file::IniFile;
pub use lookup::Lookup;
pub use resolver::OverrideResolver;
pub use section::Section;
