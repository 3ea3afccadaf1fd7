/// Where an operation originated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    API,
    CLI { command: String },
}
