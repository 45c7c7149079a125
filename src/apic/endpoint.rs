/// Base address of the controller cluster, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Accepts a bare host or IP (HTTPS is assumed) or a full `scheme://host` base
    pub fn new(address: &str) -> Self {
        let address = address.trim().trim_end_matches('/');
        let base = if address.contains("://") {
            address.to_string()
        } else {
            format!("https://{}", address)
        };
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn login_url(&self) -> String {
        format!("{}/api/aaaLogin.json", self.base)
    }

    pub fn verify_url(&self) -> String {
        format!("{}/api/workflows/v1/controller/verify", self.base)
    }

    pub fn add_url(&self) -> String {
        format!("{}/api/workflows/v1/controller/add", self.base)
    }
}
