use crate::error::BoardError;

/// The page (or any other host) the canvas is mounted into.
pub trait Host {
    type Root;
    type Canvas;

    fn find_root(&self, id: &str) -> Option<Self::Root>;
    fn create_canvas(&self, root: &Self::Root) -> Result<Self::Canvas, BoardError>;
}

/// Looks up the root container and mounts a fresh canvas inside it. Nothing
/// is created when the root is missing.
pub fn mount<H: Host>(host: &H, root_id: &str) -> Result<H::Canvas, BoardError> {
    let root = host
        .find_root(root_id)
        .ok_or_else(|| BoardError::MissingRootElement(format!("#{root_id}")))?;

    let canvas = host.create_canvas(&root)?;
    log::info!("Mounted canvas into #{root_id}");
    Ok(canvas)
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use super::Host;
    use crate::error::BoardError;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlCanvasElement, HtmlDivElement};

    pub struct DomHost {
        document: Document,
    }

    impl DomHost {
        pub fn new() -> Result<Self, BoardError> {
            web_sys::window()
                .and_then(|win| win.document())
                .map(|document| Self { document })
                .ok_or_else(|| BoardError::MissingRootElement("no document".to_string()))
        }
    }

    impl Host for DomHost {
        type Root = HtmlDivElement;
        type Canvas = HtmlCanvasElement;

        fn find_root(&self, id: &str) -> Option<HtmlDivElement> {
            self.document
                .get_element_by_id(id)?
                .dyn_into::<HtmlDivElement>()
                .ok()
        }

        fn create_canvas(&self, root: &HtmlDivElement) -> Result<HtmlCanvasElement, BoardError> {
            let canvas: HtmlCanvasElement = self
                .document
                .create_element("canvas")
                .ok()
                .and_then(|element| element.dyn_into().ok())
                .ok_or_else(|| {
                    BoardError::MissingDrawingContext(
                        "could not create a canvas element".to_string(),
                    )
                })?;

            let style = canvas.style();
            for (property, value) in [
                ("width", "100%"),
                ("height", "100%"),
                ("display", "block"),
                ("border", "1px solid black"),
                ("background-color", "white"),
            ] {
                if style.set_property(property, value).is_err() {
                    log::warn!("Could not set canvas style {property}: {value}");
                }
            }

            root.append_child(&canvas).map_err(|_| {
                BoardError::MissingRootElement("could not append the canvas".to_string())
            })?;

            Ok(canvas)
        }
    }
}
