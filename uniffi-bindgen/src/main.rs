// Generates Swift/Kotlin bindings for hola_core:
//   cargo run -p uniffi-bindgen -- generate --library <libhola_core> --language swift --out-dir <dir>
fn main() {
    uniffi::uniffi_bindgen_main()
}
