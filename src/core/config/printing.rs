use crate::api::client::DEFAULT_API_BASE;
use crate::core::config::data::{path_display, Config};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        if let Ok(path) = Config::get_config_path() {
            println!("  file: {}", path_display(path));
        }
        match &self.api_base {
            Some(api_base) => println!("  api-base: {api_base}"),
            None => println!("  api-base: (unset, using {DEFAULT_API_BASE})"),
        }
        match &self.default_language {
            Some(code) => println!("  default-language: {code}"),
            None => println!("  default-language: (unset)"),
        }
    }
}
