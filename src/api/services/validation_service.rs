use std::ffi::CStr;
use std::os::raw::c_char;
use image::GrayImage;
use crate::api::types::ApiResult;

pub fn parse_c_string(ptr: *const c_char, field_name: &str) -> Result<String, *mut ApiResult> {
    if ptr.is_null() {
        return Err(ApiResult::error_ptr(format!("{} is null", field_name)));
    }

    unsafe {
        match CStr::from_ptr(ptr).to_str() {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(ApiResult::error_ptr(format!("Invalid UTF-8 string for {}", field_name))),
        }
    }
}

pub fn parse_optional_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    unsafe {
        CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
    }
}

/// Copies a row-major 8-bit grayscale buffer of `width * height` bytes.
pub fn parse_gray_frame(pixels: *const u8, width: u32, height: u32) -> Result<GrayImage, *mut ApiResult> {
    if pixels.is_null() {
        return Err(ApiResult::error_ptr("Pixel buffer is null"));
    }

    let len = validate_frame_dimensions(width, height).map_err(ApiResult::error_ptr)?;

    let data = unsafe { std::slice::from_raw_parts(pixels, len) }.to_vec();

    GrayImage::from_raw(width, height, data)
        .ok_or_else(|| ApiResult::error_ptr(format!("Pixel buffer does not match {}x{}", width, height)))
}

pub fn validate_frame_dimensions(width: u32, height: u32) -> Result<usize, String> {
    if width == 0 || height == 0 {
        return Err(format!("Frame must be at least 1x1, got {}x{}", width, height));
    }

    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| format!("Frame {}x{} is too large", width, height))
}

pub fn validate_config_json(config_str: &str) -> Result<(), *mut ApiResult> {
    if config_str.trim().is_empty() {
        return Err(ApiResult::error_ptr("Config string is empty"));
    }
    Ok(())
}
