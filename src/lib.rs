use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod engine;
pub mod error;
pub mod types;

use crate::board::Board;
use crate::engine::{MoveRequest, MoveSelector, PositionalSelector, choose_move};
use crate::error::EngineError;
use crate::types::Side;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Picks a move with the alpha-beta search.
///
/// `request` is `{ player, board, legal_moves: [{ row, col }], depth? }`;
/// the result is `{ index, row, col }`.
#[wasm_bindgen]
pub fn select_move(request: JsValue) -> Result<JsValue, JsValue> {
    let request = parse_request(request)?;
    let selector = request.default_selector();
    run(&request, &selector)
}

/// Picks the candidate on the highest-weighted square, without lookahead.
#[wasm_bindgen]
pub fn select_positional_move(request: JsValue) -> Result<JsValue, JsValue> {
    let request = parse_request(request)?;
    run(&request, &PositionalSelector)
}

/// Lists the legal moves of `player` on `board` as `[{ row, col }]`.
#[wasm_bindgen]
pub fn legal_moves(board: Vec<u8>, player: u8) -> Result<JsValue, JsValue> {
    let side = Side::from_u8(player).map_err(to_js_error)?;
    let board = Board::from_cells(&board, side).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&board.legal_moves()).map_err(JsValue::from)
}

fn parse_request(request: JsValue) -> Result<MoveRequest, JsValue> {
    serde_wasm_bindgen::from_value(request).map_err(JsValue::from)
}

fn run(request: &MoveRequest, selector: &dyn MoveSelector) -> Result<JsValue, JsValue> {
    let reply = choose_move(request, selector).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&reply).map_err(JsValue::from)
}

fn to_js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
