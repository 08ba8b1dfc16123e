//! Image sinks for finished framebuffers.
//!
//! Files are written next to their destination and renamed into place once
//! complete, so a failed save never leaves a truncated image behind.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageFormat {
	/// Binary portable pixmap (P6)
	Ppm,
	Png,
}

impl ImageFormat {
	/// Format selected by the file extension, case insensitive
	pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
		let path = path.as_ref();
		let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
		match ext.as_ref().map(String::as_str) {
			Some("ppm") => Ok(ImageFormat::Ppm),
			Some("png") => Ok(ImageFormat::Png),
			_ => Err(Error::UnsupportedFormat(path.display().to_string())),
		}
	}
}

/// Raw P6 dump: header, then interleaved RGB rows without padding
pub fn write_ppm<W: Write>(w: &mut W, width: usize, height: usize, pixels: &[u8]) -> io::Result<()> {
	write!(w, "P6\n{} {}\n{}\n", width, height, 255)?;
	w.write_all(pixels)?;
	w.flush()
}

/// Save the framebuffer, with the format picked from the extension of `path`
pub fn save<P: AsRef<Path>>(path: P, framebuffer: &Framebuffer) -> Result<()> {
	let path = path.as_ref();
	let format = ImageFormat::from_path(path)?;
	let tmp = tmp_path(path);

	let written = write_file(&tmp, format, framebuffer).and_then(|_| fs::rename(&tmp, path).map_err(Error::from));
	if written.is_err() {
		// the file may not exist if creating it failed
		let _ = fs::remove_file(&tmp);
	}
	written
}

fn write_file(path: &Path, format: ImageFormat, framebuffer: &Framebuffer) -> Result<()> {
	let (width, height) = (framebuffer.width(), framebuffer.height());
	match format {
		ImageFormat::Ppm => {
			let mut f = BufWriter::new(File::create(path)?);
			write_ppm(&mut f, width, height, framebuffer.as_bytes())?;
		}
		ImageFormat::Png => {
			image::save_buffer_with_format(
				path,
				framebuffer.as_bytes(),
				width as u32,
				height as u32,
				image::ColorType::Rgb8,
				image::ImageFormat::Png,
			)?;
		}
	}
	Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
	let mut name = path.as_os_str().to_owned();
	name.push(".tmp");
	PathBuf::from(name)
}
