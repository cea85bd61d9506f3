use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 優先，否則依 verbose 決定本 crate 的層級
fn default_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "shark_habitat=debug,info"
    } else {
        "shark_habitat=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

fn base_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(base_layer().compact())
        .init();
}

/// JSON 格式，方便服務部署時由日誌收集器解析
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(base_layer().json())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_follows_verbosity() {
        // 測試環境未必乾淨，只在沒有 RUST_LOG 時檢查預設值
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let quiet = default_filter(false).to_string().to_lowercase();
        let verbose = default_filter(true).to_string().to_lowercase();
        assert!(quiet.contains("shark_habitat=info"));
        assert!(verbose.contains("shark_habitat=debug"));
    }
}
