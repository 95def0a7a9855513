use crate::app::config::{FileRotation, LogType, LoggingConfig};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::{FmtSpan, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

type DynLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the non-blocking log writers alive, dropping it flushes
/// anything still buffered
#[derive(Default)]
pub struct LoggingGuards {
    guards: Vec<WorkerGuard>,
}

impl LoggingGuards {
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

fn fmt_layer(writer: NonBlocking, json: bool, color: bool, spans: bool) -> DynLayer {
    let span_events = if spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if json {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_span_events(span_events)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_timer(CompactTime)
            .with_ansi(color)
            .with_writer(writer)
            .with_span_events(span_events)
            .boxed()
    }
}

/// Installs the global tracing subscriber with one layer per sink
pub fn init(config: &LoggingConfig) -> Result<LoggingGuards> {
    config.validate()?;

    let crate_name = env!("CARGO_PKG_NAME");
    let filter = EnvFilter::from_default_env()
        .add_directive("warn".parse()?)
        .add_directive(format!("{}={}", crate_name, config.level).parse()?);

    let mut layers: Vec<DynLayer> = Vec::with_capacity(config.sinks.len());
    let mut guards = LoggingGuards::default();

    for sink in &config.sinks {
        match &sink.dest {
            LogType::Stdout { color, json } => {
                let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
                guards.guards.push(guard);

                layers.push(fmt_layer(writer, *json, *color, sink.spans));
            }
            LogType::File {
                path,
                json,
                rotation,
                max_files,
            } => {
                let (writer, guard) = create_file_writer(path, rotation, *max_files)?;
                guards.guards.push(guard);

                layers.push(fmt_layer(writer, *json, false, sink.spans));
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(guards)
}

fn create_file_writer(
    path: &Path,
    rotation: &FileRotation,
    max_files: usize,
) -> Result<(NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    let directory = path.parent().unwrap_or_else(|| Path::new("."));

    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory).with_context(|| {
            format!("failed to create log directory {}", directory.display())
        })?;
    }

    let file_appender = match rotation {
        FileRotation::Daily => tracing_appender::rolling::daily(directory, file_name),
        FileRotation::Hourly => tracing_appender::rolling::hourly(directory, file_name),
        FileRotation::Never => tracing_appender::rolling::never(directory, file_name),
    };

    cleanup_old_files(directory, file_name, max_files)?;

    Ok(tracing_appender::non_blocking(file_appender))
}

fn cleanup_old_files(directory: &Path, prefix: &str, max_files: usize) -> Result<()> {
    if max_files == 0 || directory.as_os_str().is_empty() {
        return Ok(());
    }

    let mut files: Vec<_> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.starts_with(prefix))
                .unwrap_or(false)
        })
        .filter_map(|entry| {
            entry
                .metadata()
                .ok()
                .and_then(|meta| meta.modified().ok().map(|time| (entry.path(), time)))
        })
        .collect();

    if files.len() <= max_files {
        return Ok(());
    }

    files.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in files.iter().skip(max_files) {
        let _ = std::fs::remove_file(path);
    }

    Ok(())
}
