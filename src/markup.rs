//! Fixed markup of the embedded wallet dialog.
//!
//! The element ids here are the contract between the markup, the dialog
//! controller (listener wiring and status toggling) and the renderer.

use crate::dom::{Display, Document, NodeId, Tag};
use crate::status::ConnectionStatus;

pub const DEFAULT_STYLESHEET_HREF: &str =
    "/node_modules/@solana-mobile/wallet-adapter-mobile/styles.css";
pub const DEFAULT_TITLE: &str = "Jupiter";

pub const ROOT_ID: &str = "mobile-wallet-adapter-embedded-root-ui";
pub const ROOT_CLASS: &str = "mobile-wallet-adapter-embedded-modal";
pub const CLOSE_BUTTON_ID: &str = "mobile-wallet-adapter-embedded-modal-close";
pub const CANCEL_BUTTON_ID: &str = "cancel-btn";
pub const CONNECT_BUTTON_ID: &str = "connect-btn";

pub const SUBTITLE: &str = "Connect to your mobile wallet app through Bluetooth.";

const CLOSE_ICON_PATH: &str = "M14 12.461 8.3 6.772l5.234-5.233L12.006 0 6.772 5.234 1.54 0 0 1.539l5.234 5.233L0 12.006l1.539 1.528L6.772 8.3l5.69 5.7L14 12.461z";
const BLUETOOTH_ICON_PATH: &str = "M14.24 12.01l2.32 2.32c.28-.72.44-1.51.44-2.33 0-.82-.16-1.59-.43-2.31l-2.33 2.32zm5.29-5.3l-1.26 1.26c.63 1.21.98 2.57.98 4.02s-.36 2.82-.98 4.02l1.2 1.2c.97-1.54 1.54-3.36 1.54-5.31-.01-1.89-.55-3.67-1.48-5.19zm-3.82 1L10 2H9v7.59L4.41 5 3 6.41 8.59 12 3 17.59 4.41 19 9 14.41V22h1l5.71-5.71-4.3-4.29 4.3-4.29zM11 5.83l1.88 1.88L11 9.59V5.83zm1.88 10.46L11 18.17v-3.76l1.88 1.88z";
const CHECKMARK_ICON_PATH: &str = "M9 16.17L4.83 12l-1.42 1.41L9 19 21 7l-1.41-1.41z";

/// Build a detached `<link rel="stylesheet">` pointing at `href`.
pub fn build_stylesheet_link(doc: &mut Document, href: &str) -> NodeId {
    let link = doc.create_element(Tag::Link);
    doc.set_attribute(link, "rel", "stylesheet");
    doc.set_attribute(link, "type", "text/css");
    doc.set_attribute(link, "href", href);
    link
}

/// Build the detached dialog root with its full subtree.
///
/// `title` is rendered in bold at the start of the heading.
pub fn build_dialog(doc: &mut Document, title: &str) -> NodeId {
    let root = doc.create_element(Tag::Div);
    doc.set_id(root, ROOT_ID);
    doc.add_class(root, ROOT_CLASS);

    let content = child(doc, root, Tag::Div);
    doc.add_class(content, "mobile-wallet-adapter-embedded-modal-content");

    let close = child(doc, content, Tag::Button);
    doc.set_id(close, CLOSE_BUTTON_ID);
    doc.add_class(close, "mobile-wallet-adapter-embedded-modal-close");
    icon(doc, close, "close-icon", "14", None, None, CLOSE_ICON_PATH);

    let heading = child(doc, content, Tag::H1);
    let bold = child(doc, heading, Tag::B);
    text(doc, bold, title);
    text(doc, heading, " wants to connect");

    let subtitle = child(doc, content, Tag::P);
    doc.add_class(subtitle, "mobile-wallet-adapter-embedded-modal-subtitle");
    text(doc, subtitle, SUBTITLE);

    let container = child(doc, content, Tag::Div);
    doc.add_class(
        container,
        "mobile-wallet-adapter-embedded-modal-connection-status-container",
    );
    for status in ConnectionStatus::ALL {
        status_panel(doc, container, status);
    }

    let buttons = child(doc, content, Tag::Div);
    doc.add_class(buttons, "button-group");
    for (id, label) in [(CANCEL_BUTTON_ID, "Cancel"), (CONNECT_BUTTON_ID, "Connect")] {
        let button = child(doc, buttons, Tag::Button);
        doc.set_id(button, id);
        doc.add_class(button, id);
        text(doc, button, label);
    }

    root
}

fn status_panel(doc: &mut Document, container: NodeId, status: ConnectionStatus) -> NodeId {
    let panel = child(doc, container, Tag::Div);
    doc.set_id(panel, status.panel_id());
    doc.add_class(panel, "connection-status");

    match status {
        ConnectionStatus::NotConnected => {
            icon(doc, panel, "bluetooth-icon", "24", Some("0 0 24 24"), Some("#a0a0a0"), BLUETOOTH_ICON_PATH);
        }
        ConnectionStatus::Connecting => {
            let spinner = child(doc, panel, Tag::Div);
            doc.add_class(spinner, "spinner");
            doc.set_display(panel, Display::None);
        }
        ConnectionStatus::Connected => {
            icon(doc, panel, "checkmark-icon", "24", Some("0 0 24 24"), Some("#4CAF50"), CHECKMARK_ICON_PATH);
            doc.set_display(panel, Display::None);
        }
    }

    let label = child(doc, panel, Tag::P);
    text(doc, label, status.label());
    panel
}

fn icon(
    doc: &mut Document,
    parent: NodeId,
    class: &str,
    size: &str,
    view_box: Option<&str>,
    fill: Option<&str>,
    path_data: &str,
) -> NodeId {
    let svg = child(doc, parent, Tag::Svg);
    doc.add_class(svg, class);
    doc.set_attribute(svg, "width", size);
    doc.set_attribute(svg, "height", size);
    if let Some(view_box) = view_box {
        doc.set_attribute(svg, "viewBox", view_box);
    }
    let path = child(doc, svg, Tag::Path);
    doc.set_attribute(path, "d", path_data);
    if let Some(fill) = fill {
        doc.set_attribute(path, "fill", fill);
    }
    svg
}

fn child(doc: &mut Document, parent: NodeId, tag: Tag) -> NodeId {
    let node = doc.create_element(tag);
    doc.append_child(parent, node);
    node
}

fn text(doc: &mut Document, parent: NodeId, content: &str) {
    let node = doc.create_text(content);
    doc.append_child(parent, node);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(title: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = build_dialog(&mut doc, title);
        let body = doc.body();
        doc.append_child(body, root);
        (doc, root)
    }

    #[test]
    fn test_stylesheet_link_attributes() {
        let mut doc = Document::new();
        let link = build_stylesheet_link(&mut doc, DEFAULT_STYLESHEET_HREF);
        let element = doc.element(link);
        assert_eq!(element.tag, Tag::Link);
        assert_eq!(element.attr("rel"), Some("stylesheet"));
        assert_eq!(element.attr("type"), Some("text/css"));
        assert_eq!(element.attr("href"), Some(DEFAULT_STYLESHEET_HREF));
    }

    #[test]
    fn test_dialog_has_every_stable_id() {
        let (doc, root) = mounted(DEFAULT_TITLE);
        assert_eq!(doc.element(root).id.as_deref(), Some(ROOT_ID));
        assert!(doc.element(root).has_class(ROOT_CLASS));
        for id in [CLOSE_BUTTON_ID, CANCEL_BUTTON_ID, CONNECT_BUTTON_ID] {
            let node = doc.query_id(root, id).expect(id);
            assert_eq!(doc.element(node).tag, Tag::Button);
        }
        for status in ConnectionStatus::ALL {
            assert!(doc.query_id(root, status.panel_id()).is_some());
        }
    }

    #[test]
    fn test_title_is_rendered_in_heading() {
        let (doc, root) = mounted("Test");
        let content = doc.element(root).children()[0];
        let heading = doc
            .element(content)
            .children()
            .iter()
            .copied()
            .find(|n| doc.element(*n).tag == Tag::H1)
            .unwrap();
        assert_eq!(doc.text_content(heading), "Test wants to connect");
    }

    #[test]
    fn test_only_not_connected_panel_starts_visible() {
        let (doc, root) = mounted(DEFAULT_TITLE);
        for status in ConnectionStatus::ALL {
            let panel = doc.query_id(root, status.panel_id()).unwrap();
            assert_eq!(
                doc.is_displayed(panel),
                status == ConnectionStatus::NotConnected
            );
        }
    }

    #[test]
    fn test_button_labels() {
        let (doc, root) = mounted(DEFAULT_TITLE);
        let cancel = doc.query_id(root, CANCEL_BUTTON_ID).unwrap();
        let connect = doc.query_id(root, CONNECT_BUTTON_ID).unwrap();
        assert_eq!(doc.text_content(cancel), "Cancel");
        assert_eq!(doc.text_content(connect), "Connect");
    }
}
