//! Show or toggle the theme preference

use anyhow::Result;
use std::io::Write;

use crate::Blog;

pub fn run(blog: &Blog, toggle: bool, out: &mut impl Write) -> Result<()> {
    let mut service = blog.theme_service()?;
    let theme = if toggle {
        service.toggle()?
    } else {
        service.current()
    };
    writeln!(out, "{}", theme)?;
    Ok(())
}
