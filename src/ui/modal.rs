//! Draws the dialog's document subtree with egui.
//!
//! Elements with `display: none` are skipped, so the status panels shown on
//! screen always match the dialog's projected status.

use eframe::egui::{self, Align, Layout, RichText};

use crate::dom::{Display, Document, NodeId, Tag};
use crate::ui::theme::{parse_hex_color, ModalTheme};

const MODAL_WIDTH: f32 = 360.0;

/// Render the modal rooted at `root` if it is displayed.
///
/// Returns the button node clicked this frame, if any. The caller feeds it
/// back to the dialog controller.
pub fn render_modal(
    ctx: &egui::Context,
    doc: &Document,
    root: NodeId,
    theme: &ModalTheme,
) -> Option<NodeId> {
    if !doc.is_displayed(root) {
        return None;
    }

    let backdrop = egui::LayerId::new(egui::Order::Middle, egui::Id::new("mwa_modal_backdrop"));
    ctx.layer_painter(backdrop)
        .rect_filled(ctx.screen_rect(), 0.0, theme.backdrop);

    let mut clicked: Option<NodeId> = None;
    egui::Window::new("mwa_embedded_modal")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(theme.surface)
                .stroke(egui::Stroke::new(1.0, theme.border)),
        )
        .show(ctx, |ui| {
            ui.set_width(MODAL_WIDTH);
            render_children(ui, doc, root, theme, &mut clicked);
        });

    clicked
}

fn render_children(
    ui: &mut egui::Ui,
    doc: &Document,
    node: NodeId,
    theme: &ModalTheme,
    clicked: &mut Option<NodeId>,
) {
    for child in doc.element(node).children() {
        render_node(ui, doc, *child, theme, clicked);
    }
}

fn render_node(
    ui: &mut egui::Ui,
    doc: &Document,
    node: NodeId,
    theme: &ModalTheme,
    clicked: &mut Option<NodeId>,
) {
    let element = doc.element(node);
    if element.display == Display::None {
        return;
    }

    match element.tag {
        Tag::Div if element.has_class("spinner") => {
            ui.add(egui::Spinner::new().color(theme.accent));
        }
        Tag::Div if element.has_class("button-group") => {
            ui.add_space(8.0);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                // Right-to-left: the last button in markup order sits rightmost.
                for child in element.children().iter().rev() {
                    render_node(ui, doc, *child, theme, clicked);
                }
            });
        }
        Tag::Div if element.has_class("connection-status") => {
            ui.add_space(6.0);
            ui.horizontal(|ui| render_children(ui, doc, node, theme, clicked));
            ui.add_space(6.0);
        }
        Tag::Div => {
            ui.vertical(|ui| render_children(ui, doc, node, theme, clicked));
        }
        Tag::Button => render_button(ui, doc, node, theme, clicked),
        Tag::H1 => {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for child in element.children() {
                    let text = doc.text_content(*child);
                    let rich = RichText::new(text).heading().color(theme.text_primary);
                    if doc.element(*child).tag == Tag::B {
                        ui.label(rich.strong());
                    } else {
                        ui.label(rich);
                    }
                }
            });
        }
        Tag::P => {
            let color = if element.has_class("mobile-wallet-adapter-embedded-modal-subtitle") {
                theme.text_secondary
            } else {
                theme.text_primary
            };
            ui.label(RichText::new(doc.text_content(node)).color(color));
        }
        Tag::Svg => render_icon(ui, doc, node, theme),
        Tag::Text => {
            if let Some(text) = &element.text {
                ui.label(RichText::new(text).color(theme.text_primary));
            }
        }
        Tag::B => {
            ui.label(RichText::new(doc.text_content(node)).strong());
        }
        Tag::Head | Tag::Body | Tag::Link | Tag::Path => {}
    }
}

fn render_button(
    ui: &mut egui::Ui,
    doc: &Document,
    node: NodeId,
    theme: &ModalTheme,
    clicked: &mut Option<NodeId>,
) {
    let element = doc.element(node);
    let label = doc.text_content(node).trim().to_string();

    let response = if label.is_empty() {
        // Icon-only close button, pinned to the top-right corner.
        ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
            ui.add(egui::Button::new(RichText::new("✕").color(theme.text_muted)).frame(false))
        })
        .inner
    } else if element.has_class("connect-btn") {
        ui.add(
            egui::Button::new(RichText::new(label).color(egui::Color32::WHITE))
                .fill(theme.accent),
        )
    } else {
        ui.add(egui::Button::new(RichText::new(label).color(theme.text_primary)))
    };

    if response.clicked() {
        *clicked = Some(node);
    }
}

fn render_icon(ui: &mut egui::Ui, doc: &Document, node: NodeId, theme: &ModalTheme) {
    let element = doc.element(node);
    let glyph = if element.has_class("checkmark-icon") {
        "✔"
    } else if element.has_class("bluetooth-icon") {
        "📶"
    } else {
        return;
    };
    let color = element
        .children()
        .iter()
        .find_map(|path| doc.element(*path).attr("fill"))
        .and_then(parse_hex_color)
        .unwrap_or(theme.text_muted);
    let size = element
        .attr("width")
        .and_then(|w| w.parse::<f32>().ok())
        .unwrap_or(16.0);
    ui.label(RichText::new(glyph).size(size).color(color));
}
