use tracing_subscriber::EnvFilter;

/// Core and desktop shell at debug, dependencies at info. `RUST_LOG` wins
/// where the platform lets you set it.
const DEFAULT_DIRECTIVES: &str = "hola_core=debug,hola_desktop=debug,info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the process-wide subscriber when the first `FfiApp` is built.
///
/// - iOS: os_log under `com.hola.app`, plus `hola.log` in the data dir
/// - Android: logcat tag `hola`
/// - everywhere else: stderr
///
/// A shell that installed its own subscriber beforehand (the CLI does) keeps it.
pub fn init_logging(#[allow(unused)] data_dir: &str) {
    #[cfg(target_os = "ios")]
    {
        use tracing_subscriber::prelude::*;

        let os_log = tracing_oslog::OsLogger::new("com.hola.app", "default");

        // Console.app drops debug lines unless asked; the file keeps them.
        let _ = std::fs::create_dir_all(data_dir);
        let file_layer = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(std::path::Path::new(data_dir).join("hola.log"))
            .ok()
            .map(|file| {
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
            });

        let _ = tracing_subscriber::registry()
            .with(env_filter())
            .with(os_log)
            .with(file_layer)
            .try_init();
    }

    #[cfg(target_os = "android")]
    {
        use tracing_subscriber::prelude::*;

        let _ = tracing_subscriber::registry()
            .with(paranoid_android::layer("hola").with_filter(env_filter()))
            .try_init();
    }

    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init();
    }
}
