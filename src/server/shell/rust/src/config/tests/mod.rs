/* src/server/shell/rust/src/config/tests/mod.rs */

use super::*;
use super::loader::{find_terra_config, load_terra_config};
