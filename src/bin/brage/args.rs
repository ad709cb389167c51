use std::io::Write as _;

/// Install the global logger, filtered by `-v`/`-q`.
pub(crate) fn init_logging(level: &clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.log_level_filter());
    if level.log_level_filter() < log::LevelFilter::Debug {
        builder.filter_module("tiny_http", log::LevelFilter::Warn);
    }
    builder.format(|buf, record| {
        let style = buf.default_level_style(record.level());
        let level = record.level().as_str().to_lowercase();
        writeln!(buf, "{style}[{level}]{style:#} {}", record.args())
    });
    builder.init();
}

/// The directory a site is read from, made absolute.
pub(crate) fn source_dir(path: &std::path::Path) -> std::path::PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_owned())
}
