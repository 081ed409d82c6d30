//! Renders the portfolio page. Split into a data-shaping step producing a
//! [`PortfolioView`] and a pure template step turning the view into HTML, so
//! the shaping can be tested without string-comparing whole documents.

pub mod fallback;
pub mod template;
pub mod view;

pub use fallback::fallback_page;
pub use template::{render, render_with_year};
pub use view::{language_color, PortfolioView, RepoCard, SkillView};
