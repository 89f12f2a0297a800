//! Keeps a live map session wired to its JS click handler.

use crate::backend::{on_marker_click, JsMapBackend};
use mandi_core::location::MandiLocation;
use mandi_core::map::{MapOptions, MapSession};
use mandi_core::RenderError;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;

/// Owns the map session and the click closure; dropping it tears the map down.
pub struct MapBinding {
    // Declared first so the map is destroyed before its click handler
    session: Rc<RefCell<MapSession<JsMapBackend>>>,
    _on_click: Closure<dyn FnMut(u32)>,
}

impl MapBinding {
    pub fn attach(
        container_id: &str,
        options: &MapOptions,
        locations: Vec<MandiLocation>,
    ) -> Result<Self, RenderError> {
        let session = MapSession::start(JsMapBackend, container_id, options, locations)?;
        let handle = session.handle();
        let session = Rc::new(RefCell::new(session));
        let weak = Rc::downgrade(&session);
        let on_click = Closure::<dyn FnMut(u32)>::new(move |marker: u32| {
            let Some(session) = weak.upgrade() else {
                return;
            };
            match session.try_borrow_mut() {
                Ok(mut session) => session.handle_marker_click(marker as usize),
                Err(_) => log::warn!("[Mandi] marker {} click while map busy", marker),
            };
        });
        // On failure `session` drops here and destroys the map
        on_marker_click(handle, &on_click)?;
        Ok(Self {
            session,
            _on_click: on_click,
        })
    }

    pub fn marker_count(&self) -> usize {
        self.session.borrow().marker_count()
    }
}
