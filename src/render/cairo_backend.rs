use std::f64::consts::{FRAC_PI_2, PI};
use std::io::Write;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::Viewport;
use crate::error::{DashboardError, DashboardResult};
use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Rasterizes chart frames onto an offscreen Cairo image surface.
///
/// The surface is re-created when a frame arrives with a different viewport,
/// so a resized chart keeps drawing at its new size.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    viewport: Viewport,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(viewport: Viewport) -> DashboardResult<Self> {
        Ok(Self {
            surface: create_surface(viewport)?,
            viewport,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> DashboardResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the last rendered frame as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> DashboardResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| DashboardError::InvalidData(format!("failed to encode png: {err}")))
    }

    /// Draws `frame` on an externally owned context, e.g. a widget callback.
    pub fn render_on_context(&mut self, context: &Context, frame: &RenderFrame) -> DashboardResult<()> {
        frame.validate()?;
        let mut stats = CairoRenderStats::default();

        apply_color(context, self.clear_color);
        context.paint().map_err(|err| backend_error("failed to clear surface", err))?;

        context.rectangle(
            0.0,
            0.0,
            f64::from(frame.viewport.width),
            f64::from(frame.viewport.height),
        );
        context.clip();

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context.stroke().map_err(|err| backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for rect in &frame.rects {
            rect_path(context, *rect);
            apply_color(context, rect.fill_color);
            context
                .fill_preserve()
                .map_err(|err| backend_error("failed to fill rect", err))?;
            if rect.border_width > 0.0 {
                apply_color(context, rect.border_color);
                context.set_line_width(rect.border_width);
                context.stroke().map_err(|err| backend_error("failed to stroke rect", err))?;
            } else {
                context.new_path();
            }
            stats.rects_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            layout.set_font_description(Some(&FontDescription::from_string(&format!(
                "Sans {}px",
                text.font_size_px
            ))));
            layout.set_text(&text.text);

            let (width, height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(width) / 2.0,
                TextHAlign::Right => text.x - f64::from(width),
            };
            apply_color(context, text.color);
            context.move_to(x, text.y - f64::from(height) / 2.0);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        context.reset_clip();
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()> {
        if frame.viewport != self.viewport {
            self.surface = create_surface(frame.viewport)?;
            self.viewport = frame.viewport;
        }
        let context = Context::new(&self.surface)
            .map_err(|err| backend_error("failed to create cairo context", err))?;
        self.render_on_context(&context, frame)
    }
}

fn create_surface(viewport: Viewport) -> DashboardResult<ImageSurface> {
    let (Ok(width), Ok(height)) = (i32::try_from(viewport.width), i32::try_from(viewport.height)) else {
        return Err(DashboardError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    };
    if width <= 0 || height <= 0 {
        return Err(DashboardError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| backend_error("failed to create cairo surface", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn rect_path(context: &Context, rect: RectPrimitive) {
    let radius = rect.corner_radius.min(rect.width * 0.5).min(rect.height * 0.5);
    if radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);
    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn backend_error(prefix: &str, err: cairo::Error) -> DashboardError {
    DashboardError::InvalidData(format!("{prefix}: {err}"))
}
