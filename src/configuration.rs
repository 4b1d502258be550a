use crate::session::Credentials;
use std::time::Duration;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn api_url(&self) -> String;
    fn request_timeout(&self) -> Duration;
    fn upload_timeout(&self) -> Duration;
    fn admin_credentials(&self) -> Credentials;
    fn display_name(&self) -> Option<String>;
}
