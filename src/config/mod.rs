/// Runtime configuration for the receiver.
///
/// Assembled from CLI flags in `cli::serve`; every knob can also be supplied
/// through the environment (`HOST`, `PORT`, `DB_PATH`), with clap handling
/// the fallback order.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
