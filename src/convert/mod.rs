//! Convert module - Text converters built on the document engine.
//!
//! - [`env`] - Property keys, YAML documents and Spring `@Value` annotations
//!   to environment variables
//! - [`properties`] - Line based `key=value` properties parsing
//! - [`proto`] - Java records to protobuf messages
//! - [`sql`] - Filling `?` placeholders from statement logs

pub mod env;
pub mod properties;
pub mod proto;
pub mod sql;

pub use env::{
    is_valid_k8s_env_name, properties_to_env, property_key_to_env_var, render_env,
    spring_annotations_to_env, validate_env_name, yaml_to_env, EnvEntry, EnvFormat, EnvNameError,
};
pub use properties::{parse_properties, properties_to_yaml};
pub use proto::{java_records_to_proto, ProtoOptions};
pub use sql::{fill_from_log, fill_placeholders, parse_parameters, SqlParam};
