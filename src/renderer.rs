pub mod bubble;
pub mod canvas;

pub use bubble::{
    BUBBLE_GAP, Bubble, BubbleStyle, draw_bubble, draw_labeled, measure_bubble, measure_labeled,
};
pub use canvas::{Canvas, Color};
