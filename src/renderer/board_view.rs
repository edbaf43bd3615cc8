//! DOM board view
//!
//! Builds the card grid once and mirrors [`GameEvent`]s onto element classes
//! and HUD text.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::labels::{grid_style, moves_label, time_label, win_summary_html};
use crate::sim::{Board, GameEvent};

pub struct BoardView {
    document: Document,
    cards: Vec<Element>,
}

impl BoardView {
    /// Replace the `.board` placeholder with a generated grid
    pub fn mount(document: &Document, board: &Board) -> Result<Self, JsValue> {
        let placeholder = document
            .query_selector(".board")?
            .ok_or_else(|| JsValue::from_str("no .board element"))?;

        let grid = document.create_element("div")?;
        grid.set_class_name("board");
        grid.set_attribute("style", &grid_style(board))?;
        grid.set_attribute("data-dimension", &board.dimension.to_string())?;

        let mut cards = Vec::with_capacity(board.len());
        for (index, card) in board.cards.iter().enumerate() {
            let el = document.create_element("div")?;
            el.set_class_name("card");
            el.set_attribute("data-index", &index.to_string())?;

            let front = document.create_element("div")?;
            front.set_class_name("card-front");
            let back = document.create_element("div")?;
            back.set_class_name("card-back");
            back.set_text_content(Some(card.symbol));

            el.append_child(&front)?;
            el.append_child(&back)?;
            grid.append_child(&el)?;
            cards.push(el);
        }

        placeholder.replace_with_with_node_1(&grid)?;
        log::info!("Board mounted with {} cards", cards.len());

        Ok(Self {
            document: document.clone(),
            cards,
        })
    }

    fn card(&self, index: usize) -> Result<&Element, JsValue> {
        self.cards
            .get(index)
            .ok_or_else(|| JsValue::from_str("card index out of range"))
    }

    fn set_text(&self, selector: &str, text: &str) {
        if let Some(el) = self.document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Mirror one game event onto the page
    pub fn apply(&self, event: &GameEvent) -> Result<(), JsValue> {
        match event {
            GameEvent::Started => {
                if let Some(button) = self.document.query_selector("button")? {
                    button.class_list().add_1("disabled")?;
                }
            }
            GameEvent::CardFlipped { index, .. } => {
                self.card(*index)?.class_list().add_1("flipped")?;
            }
            GameEvent::PairMatched { first, second } => {
                self.card(*first)?.class_list().add_1("matched")?;
                self.card(*second)?.class_list().add_1("matched")?;
            }
            GameEvent::CardsHidden { indices } => {
                for &index in indices {
                    self.card(index)?.class_list().remove_1("flipped")?;
                }
            }
            GameEvent::ClockTicked(hud) => {
                self.set_text(".moves", &moves_label(hud.moves));
                self.set_text(".timer", &time_label(hud.seconds));
            }
            GameEvent::Won(summary) => {
                if let Some(container) = self.document.query_selector(".board-container")? {
                    container.class_list().add_1("flipped")?;
                }
                if let Some(win) = self.document.query_selector(".win")? {
                    win.set_inner_html(&win_summary_html(summary));
                }
            }
        }
        Ok(())
    }

    /// Apply a batch, logging failures instead of aborting
    pub fn apply_all(&self, events: &[GameEvent]) {
        for event in events {
            if let Err(e) = self.apply(event) {
                log::warn!("Failed to render {:?}: {:?}", event, e);
            }
        }
    }
}
