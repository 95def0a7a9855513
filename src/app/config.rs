use crate::core::interests::EntityKind;
use config::Config;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct FirestoreConfig {
    pub project_id: String,
    #[serde(default)]
    #[builder(default)]
    pub database_id: Option<String>,
    /// host:port of a local emulator, plain http
    #[serde(default)]
    #[builder(default)]
    pub emulator_host: Option<String>,
    #[serde(default)]
    #[builder(default)]
    pub credentials_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct CacheConfig {
    /// Directory of the durable like cache. Without one, likes are
    /// only cached in memory and lost on restart
    #[serde(default)]
    #[builder(default)]
    pub dir: Option<PathBuf>,
    /// Largest serialized like map accepted per user
    #[serde(default)]
    #[builder(default)]
    pub max_entry_bytes: Option<usize>,
    /// Entry capacity of the in-memory cache
    #[serde(default = "default_memory_capacity")]
    #[builder(default = "default_memory_capacity()")]
    pub memory_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_entry_bytes: None,
            memory_capacity: default_memory_capacity(),
        }
    }
}

fn default_memory_capacity() -> u64 {
    10_000
}

/// Where one entity kind keeps its remote rows and cached map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KindConfig {
    pub collection: String,
    pub cache_prefix: String,
}

impl KindConfig {
    pub fn defaults_for(kind: EntityKind) -> Self {
        Self {
            collection: kind.default_collection().to_string(),
            cache_prefix: kind.default_cache_prefix().to_string(),
        }
    }
}

fn default_posts() -> KindConfig {
    KindConfig::defaults_for(EntityKind::Post)
}

fn default_members() -> KindConfig {
    KindConfig::defaults_for(EntityKind::Member)
}

fn default_events() -> KindConfig {
    KindConfig::defaults_for(EntityKind::Event)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KindsConfig {
    #[serde(default = "default_posts")]
    pub posts: KindConfig,
    #[serde(default = "default_members")]
    pub members: KindConfig,
    #[serde(default = "default_events")]
    pub events: KindConfig,
}

impl Default for KindsConfig {
    fn default() -> Self {
        Self {
            posts: default_posts(),
            members: default_members(),
            events: default_events(),
        }
    }
}

impl KindsConfig {
    pub fn get(&self, kind: EntityKind) -> &KindConfig {
        match kind {
            EntityKind::Post => &self.posts,
            EntityKind::Member => &self.members,
            EntityKind::Event => &self.events,
        }
    }

    /// Each kind needs its own cache namespace and collection
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let kinds = [&self.posts, &self.members, &self.events];

        for (i, a) in kinds.iter().enumerate() {
            if a.cache_prefix.trim().is_empty() || a.collection.trim().is_empty() {
                anyhow::bail!("Entity kind collection and cache_prefix must not be empty");
            }

            for b in kinds.iter().skip(i + 1) {
                if a.cache_prefix == b.cache_prefix {
                    anyhow::bail!("Duplicate like cache prefix '{}'", a.cache_prefix);
                }
                if a.collection == b.collection {
                    anyhow::bail!("Duplicate like collection '{}'", a.collection);
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Builder)]
pub struct LikesConfig {
    #[serde(default)]
    #[builder(default)]
    pub logging: LoggingConfig,
    /// Hosted remote store, the in-process store is used when absent
    #[serde(default)]
    #[builder(default)]
    pub firestore: Option<FirestoreConfig>,
    #[serde(default)]
    #[builder(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    #[builder(default)]
    pub kinds: KindsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum FileRotation {
    Daily,
    Hourly,
    Never,
}

impl Default for FileRotation {
    fn default() -> Self {
        FileRotation::Daily
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSink {
    #[serde(flatten)]
    pub dest: LogType,
    #[serde(default)]
    pub spans: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogType {
    Stdout {
        #[serde(default = "default_logtype_color")]
        color: bool,
        #[serde(default)]
        json: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        json: bool,
        #[serde(default)]
        rotation: FileRotation,
        #[serde(default)]
        max_files: usize,
    },
}

fn default_logtype_color() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub sinks: Vec<LogSink>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            sinks: vec![LogSink {
                dest: LogType::Stdout {
                    color: true,
                    json: false,
                },
                spans: false,
            }],
        }
    }
}

impl LoggingConfig {
    /// Validates the logging configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.sinks.is_empty() {
            anyhow::bail!("At least one logging sink must be configured");
        }

        self.level.parse::<tracing::Level>().map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: trace, debug, info, warn, error",
                self.level
            )
        })?;

        Ok(())
    }
}

impl LikesConfig {
    pub fn load(path: &PathBuf) -> Result<LikesConfig, anyhow::Error> {
        let cfg = Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .build()?;

        let cfg: LikesConfig = cfg.try_deserialize()?;
        cfg.kinds.validate()?;

        Ok(cfg)
    }
}
