use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("i/o error: {0}")]
	Io(#[from] io::Error),

	#[error("invalid scene description: {0}")]
	Json(#[from] serde_json::Error),

	#[error("image encoding failed: {0}")]
	Image(#[from] image::ImageError),

	#[error("mesh cache error: {0}")]
	Cache(#[from] bincode::Error),

	#[error("OBJ line {line}: {message}")]
	Obj { line: usize, message: String },

	#[error("unsupported output format: {0}")]
	UnsupportedFormat(String),

	#[error("invalid scene: {0}")]
	InvalidScene(String),
}

pub type Result<T> = std::result::Result<T, Error>;
