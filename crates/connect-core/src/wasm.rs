//! WebAssembly bindings for the ConnectPy game engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen. State
//! crosses the boundary as the same JSON snapshot the server sends.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::engine::GameEngine;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    engine: GameEngine,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game with the given board size and win length
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, columns: usize, win_length: usize) -> Result<WasmGame, JsValue> {
        let engine = GameEngine::new(GameConfig::new(rows, columns, win_length))
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        Ok(WasmGame { engine })
    }

    /// Register a player; the game starts once both have joined
    #[wasm_bindgen(js_name = addPlayer)]
    pub fn add_player(&mut self, player_id: &str) -> Result<(), JsValue> {
        self.engine.add_player(player_id).map_err(to_js)?;
        if self.engine.players_ready() {
            self.engine.start_game().map_err(to_js)?;
        }
        Ok(())
    }

    /// Drop a disc, returns whether it won
    #[wasm_bindgen(js_name = dropDisc)]
    pub fn drop_disc(&mut self, player_id: &str, column: usize) -> Result<bool, JsValue> {
        if !self.engine.is_turn(player_id) {
            return Err(JsValue::from_str("Not your turn"));
        }
        self.engine.drop_disc(player_id, column).map_err(to_js)
    }

    /// Clear the board for a new round
    #[wasm_bindgen(js_name = resetGame)]
    pub fn reset_game(&mut self) {
        self.engine.reset_game();
    }

    /// Close the game on behalf of a player
    pub fn close(&mut self, player_id: &str) {
        self.engine.close(player_id);
    }

    /// Get the identifier of the player to move
    #[wasm_bindgen(js_name = getTurn)]
    pub fn get_turn(&self) -> Option<String> {
        self.engine.current_turn().map(str::to_string)
    }

    /// Get the winner of the current round
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<String> {
        self.engine.winner().map(str::to_string)
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.engine
            .snapshot()
            .to_json()
            .unwrap_or_else(|_| "{}".to_string())
    }
}

fn to_js(err: crate::engine::GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
