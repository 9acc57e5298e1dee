pub mod color;
pub mod html;
pub mod rewriter;
pub mod template;
