//! Generated gRPC types and stubs.

pub mod session {
    tonic::include_proto!("nomnom.session");
}
