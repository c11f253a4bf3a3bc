use tracing_subscriber::{EnvFilter, fmt};

/// 安装全局 tracing 订阅者，日志写到 stderr，stdout 只留给转换结果。
///
/// `RUST_LOG` 优先，未设置或无效时使用 `fallback_filter`。
pub fn init_global_logger(fallback_filter: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { fallback_filter };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("全局日志订阅者已存在，跳过初始化");
    }
}
