use url::{form_urlencoded, Url};

use super::types::QueryParameters;

pub const ALTITUDE_PATH: &str = "/altitude";

/// A collaborator request, fully described but not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub path: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl QueryRequest {
    pub fn altitude(params: &QueryParameters) -> Self {
        Self {
            path: ALTITUDE_PATH,
            params: vec![
                ("n", params.catalog_id.to_string()),
                ("start", params.window_start.to_string()),
                ("end", params.window_end.to_string()),
                ("step_seconds", params.step_seconds.to_string()),
            ],
        }
    }

    #[cfg(test)]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    /// Resolve against `base_url`, keeping any path prefix the base carries.
    pub fn url(&self, base_url: &str) -> Result<Url, url::ParseError> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        let mut url = Url::parse(&endpoint)?;
        url.set_query(Some(&self.query_string()));
        Ok(url)
    }
}
