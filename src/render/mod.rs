pub mod framebuffer;
pub mod hud;
pub mod renderer;
pub mod surface;

pub use framebuffer::{Framebuffer, FramebufferView};
pub use hud::Hud;
pub use renderer::Renderer;
pub use surface::Surface;
