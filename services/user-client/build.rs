fn main() {
    println!("cargo:rerun-if-changed=../../proto/user.proto");

    // Server stubs are only used by the mock service in the integration tests.
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(&["../../proto/user.proto"], &["../../proto"])
        .unwrap_or_else(|e| panic!("Failed to compile protos {:?}", e));
}
