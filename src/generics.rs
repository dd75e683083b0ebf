//!这个是给程序提供泛型支持的模块
use num_complex::Complex64;
use num_traits::identities::Zero;

//这里的trait是为了让 add_hop 可以同时满足 f64 和 Complex64 的
/// Anything that can be used as a hopping amplitude or a phase factor.
pub trait hop_use: Copy + Clone + Zero {
    fn to_complex(&self) -> Complex64;
}
impl hop_use for f64 {
    fn to_complex(&self) -> Complex64 {
        Complex64::new(*self, 0.0)
    }
}

impl hop_use for Complex64 {
    fn to_complex(&self) -> Complex64 {
        *self
    }
}
