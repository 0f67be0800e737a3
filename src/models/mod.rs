pub mod booking;
pub mod host_request;
pub mod user;
pub mod venue;
