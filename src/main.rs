#[cfg(target_arch = "wasm32")]
pub fn main() {
    mentorship_web::mount();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
