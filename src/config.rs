use std::path::PathBuf;
use std::time::Duration;

pub const SOURCE_URL: &str = "https://www.noticiasagricolas.com.br/widgets/cotacoes?id=96";
pub const SOURCE_LABEL: &str = "Notícias Agrícolas";

/// Browser User-Agent; the widget host rejects the default reqwest one.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/117 Safari/537.36";

pub const SNAPSHOT_FILE: &str = "prices.json";
pub const HISTORY_FILE: &str = "precos.json";

pub const PRODUCT: &str = "cacau";
pub const CURRENCY: &str = "BRL";

pub const KG_PER_ARROBA: f64 = 15.0;
pub const KG_PER_SACA: f64 = 60.0;

/// Trading window, local hours: open at `MARKET_OPEN_HOUR`, closed from `MARKET_CLOSE_HOUR`.
pub const MARKET_OPEN_HOUR: u32 = 8;
pub const MARKET_CLOSE_HOUR: u32 = 17;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of distinct reference dates kept in the history file.
pub const DEFAULT_RETENTION_DAYS: usize = 10;

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("cacau-prices")
    } else {
        PathBuf::from(".cacau-prices")
    }
}
