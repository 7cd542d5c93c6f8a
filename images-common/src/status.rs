//! Status lines the server can answer with.

/// The fixed set of statuses the server produces, each with the reason
/// phrase written on its status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    Ok,
    Created,
    NoContent,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    InternalError,
    NotImplemented,
}

impl ResponseStatus {
    pub const ALL: [ResponseStatus; 8] = [
        ResponseStatus::Ok,
        ResponseStatus::Created,
        ResponseStatus::NoContent,
        ResponseStatus::BadRequest,
        ResponseStatus::NotFound,
        ResponseStatus::MethodNotAllowed,
        ResponseStatus::InternalError,
        ResponseStatus::NotImplemented,
    ];

    pub fn code(&self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::Created => 201,
            ResponseStatus::NoContent => 204,
            ResponseStatus::BadRequest => 400,
            ResponseStatus::NotFound => 404,
            ResponseStatus::MethodNotAllowed => 405,
            ResponseStatus::InternalError => 500,
            ResponseStatus::NotImplemented => 501,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            ResponseStatus::Ok => "OK",
            ResponseStatus::Created => "Resource created",
            ResponseStatus::NoContent => "Resource modified",
            ResponseStatus::BadRequest => "Bad request",
            ResponseStatus::NotFound => "Not found",
            ResponseStatus::MethodNotAllowed => "Method not allowed",
            ResponseStatus::InternalError => "Internal server error",
            ResponseStatus::NotImplemented => "Method not implemented",
        }
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}
