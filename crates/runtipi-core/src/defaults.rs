// ---------------------------------------------------------------------------
// Built-in defaults, applied when settings leave a value empty
// ---------------------------------------------------------------------------

pub const DEFAULT_NGINX_PORT: &str = "80";
pub const DEFAULT_NGINX_PORT_SSL: &str = "443";
pub const DEFAULT_POSTGRES_PORT: &str = "5432";
pub const DEFAULT_DOMAIN: &str = "example.com";
pub const DEFAULT_LOCAL_DOMAIN: &str = "tipi.local";
pub const DEFAULT_VERSION: &str = "dev";

// ---------------------------------------------------------------------------
// Fixed service identifiers (not user-configurable)
// ---------------------------------------------------------------------------

pub const POSTGRES_HOST: &str = "runtipi-db";
pub const POSTGRES_DBNAME: &str = "tipi";
pub const POSTGRES_USERNAME: &str = "tipi";
pub const REDIS_HOST: &str = "runtipi-redis";

// ---------------------------------------------------------------------------
// Secret derivation labels
// ---------------------------------------------------------------------------

pub const POSTGRES_PASSWORD_LABEL: &str = "postgres_password";
pub const REDIS_PASSWORD_LABEL: &str = "redis_password";
