/// S3 connection settings shared by the thumbnail binaries

/// Fallback region when neither the environment nor the SDK chain provides one
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Default)]
pub struct S3Config {
    /// AWS region; `None` defers to the SDK provider chain
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible storage (MinIO, LocalStack)
    pub endpoint: Option<String>,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub force_path_style: bool,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl S3Config {
    /// Load S3 configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            region: non_empty("AWS_REGION"),
            endpoint: non_empty("S3_ENDPOINT"),
            force_path_style: lookup("S3_FORCE_PATH_STYLE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(false),
            access_key_id: non_empty("AWS_ACCESS_KEY_ID"),
            secret_access_key: non_empty("AWS_SECRET_ACCESS_KEY"),
        }
    }

    /// Custom endpoints are addressed path-style regardless of the flag
    pub fn path_style(&self) -> bool {
        self.force_path_style || self.endpoint.is_some()
    }

    /// Build the URL an uploaded object is reachable at
    pub fn object_url(&self, region: &str, bucket: &str, key: &str) -> String {
        let key = encode_key(key);
        match (&self.endpoint, self.path_style()) {
            (Some(endpoint), _) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
            }
            (None, true) => format!("https://s3.{}.amazonaws.com/{}/{}", region, bucket, key),
            (None, false) => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
        }
    }
}

fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
