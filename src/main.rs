#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    pollster::block_on(shapeboard::run())
}

// The web build starts from `shapeboard::start`, wired up by wasm-bindgen.
#[cfg(target_arch = "wasm32")]
fn main() {}
