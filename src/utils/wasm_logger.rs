#[cfg(target_arch = "wasm32")]
pub fn wasm_log<S: std::fmt::Display>(msg: S) {
    web_sys::console::log_1(&msg.to_string().into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn wasm_log<S: std::fmt::Display>(msg: S) {
    eprintln!("{}", msg);
}

pub fn wasm_logf(args: std::fmt::Arguments) {
    wasm_log(args);
}

#[macro_export]
macro_rules! wasm_log {
    ($($t:tt)*) => ($crate::utils::wasm_logger::wasm_logf(format_args!($($t)*)))
}
