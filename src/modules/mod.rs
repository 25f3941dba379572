// Module exports for pure logic
pub mod browser;    // Window model: tab collection, active tab, address bar
pub mod engine;     // Web engine seam
pub mod navigation; // Address-bar classification, home page
pub mod tab;        // Single tab state
