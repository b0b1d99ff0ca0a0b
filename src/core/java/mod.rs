pub mod runtime;

pub use runtime::is_version_acceptable;
pub use runtime::verify_java;
pub use runtime::JavaProbe;
pub use runtime::SystemJava;
pub use runtime::MIN_JAVA_MAJOR;
