fn main() {
    let proto_file = "proto/registry_service.proto";
    println!("cargo:rerun-if-changed={proto_file}");
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&[proto_file], &["proto"])
        .expect("registry service proto compilation must succeed");
}
