//! Integration tests for the plugin binary.
//!
//! Drives `protoc-gen-twirp_php` the way protoc does: an encoded
//! `CodeGeneratorRequest` on stdin, an encoded `CodeGeneratorResponse` on
//! stdout.

#![allow(non_snake_case)]

use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::{DescriptorProto, FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};
use std::io::Write;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_protoc-gen-twirp_php");

fn billing_proto() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("acme/billing/invoice.proto".into()),
        package: Some("acme.billing".into()),
        service: vec![ServiceDescriptorProto {
            name: Some("Invoicer".into()),
            method: vec![MethodDescriptorProto {
                name: Some("GetInvoice".into()),
                input_type: Some(".acme.billing.GetInvoiceRequest".into()),
                output_type: Some(".acme.billing.Invoice".into()),
                ..Default::default()
            }],
            ..Default::default()
        }],
        message_type: vec![
            DescriptorProto {
                name: Some("GetInvoiceRequest".into()),
                ..Default::default()
            },
            DescriptorProto {
                name: Some("Invoice".into()),
                nested_type: vec![DescriptorProto {
                    name: Some("LineItem".into()),
                    ..Default::default()
                }],
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

fn run_plugin(stdin: &[u8], args: &[&str]) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn request(parameter: Option<&str>) -> Vec<u8> {
    CodeGeneratorRequest {
        file_to_generate: vec!["acme/billing/invoice.proto".into()],
        parameter: parameter.map(str::to_string),
        proto_file: vec![billing_proto()],
        ..Default::default()
    }
    .encode_to_vec()
}

// =============================================================================
// Plugin mode
// =============================================================================

mod plugin_mode {
    use super::*;

    #[test]
    fn plugin___valid_request___writes_response_with_files() {
        let output = run_plugin(&request(None), &[]);

        assert!(output.status.success());
        let response = CodeGeneratorResponse::decode(output.stdout.as_slice()).unwrap();
        assert_eq!(response.error, None);
        let names: Vec<&str> = response.file.iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), 8);
        assert!(names.contains(&"Acme/Billing/Invoicer.php"));
        assert!(names.contains(&"Acme/Billing/Invoice/LineItem.php"));
        assert!(names.contains(&"Acme/Billing/TwirpError.php"));
    }

    #[test]
    fn plugin___bad_parameter___reports_error_in_response() {
        let output = run_plugin(&request(Some("collision")), &[]);

        assert!(output.status.success());
        let response = CodeGeneratorResponse::decode(output.stdout.as_slice()).unwrap();
        assert!(response.file.is_empty());
        assert!(response.error.unwrap().contains("configuration"));
    }

    #[test]
    fn plugin___debug_log_level___logs_to_stderr_only() {
        let output = run_plugin(&request(Some("log_level=debug")), &[]);

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("protoc-gen-twirp_php: DEBUG"));
        let response = CodeGeneratorResponse::decode(output.stdout.as_slice()).unwrap();
        assert_eq!(response.error, None);
    }

    #[test]
    fn plugin___undecodable_request___exits_with_decode_code() {
        let output = run_plugin(&[0xff, 0xff, 0xff], &[]);

        assert_eq!(output.status.code(), Some(5));
        assert!(output.stdout.is_empty());
    }
}

// =============================================================================
// Subcommands
// =============================================================================

mod subcommands {
    use super::*;
    use prost_types::FileDescriptorSet;
    use tempfile::TempDir;

    #[test]
    fn templates___lists_bundle() {
        let output = run_plugin(&[], &["templates"]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.lines().count(), 6);
        assert!(stdout.contains("_Service_JsonClient.php.hbs"));
    }

    #[test]
    fn generate___descriptor_set___writes_tree() {
        let dir = TempDir::new().unwrap();
        let set_path = dir.path().join("set.pb");
        std::fs::write(
            &set_path,
            FileDescriptorSet {
                file: vec![billing_proto()],
            }
            .encode_to_vec(),
        )
        .unwrap();
        let out = dir.path().join("out");

        let output = run_plugin(
            &[],
            &[
                "generate",
                "--descriptor-set",
                set_path.to_str().unwrap(),
                "--output",
                out.to_str().unwrap(),
            ],
        );

        assert!(output.status.success());
        assert!(out.join("Acme/Billing/InvoicerServer.php").is_file());
        assert!(out.join("Acme/Billing/Invoice/LineItem.php").is_file());
    }

    #[test]
    fn generate___unknown_file___exits_with_configuration_code() {
        let dir = TempDir::new().unwrap();
        let set_path = dir.path().join("set.pb");
        std::fs::write(
            &set_path,
            FileDescriptorSet {
                file: vec![billing_proto()],
            }
            .encode_to_vec(),
        )
        .unwrap();

        let output = run_plugin(
            &[],
            &[
                "generate",
                "--descriptor-set",
                set_path.to_str().unwrap(),
                "--output",
                dir.path().join("out").to_str().unwrap(),
                "--file",
                "acme/nope.proto",
            ],
        );

        assert_eq!(output.status.code(), Some(1));
        assert!(!dir.path().join("out").exists());
    }
}
