use std::ffi::CString;
use std::os::raw::c_char;

#[repr(C)]
pub struct ApiResult {
    pub success: u8,
    pub data: *mut c_char,
    pub error: *mut c_char,
}

pub type SessionId = String;

impl ApiResult {
    pub fn success(data: String) -> Self {
        let data_ptr = match CString::new(data) {
            Ok(cstring) => cstring.into_raw(),
            Err(_) => CString::new("Data contains invalid characters")
                .expect("Hardcoded fallback string should be valid")
                .into_raw(),
        };

        Self {
            success: 1,
            data: data_ptr,
            error: std::ptr::null_mut(),
        }
    }

    pub fn error(error: String) -> Self {
        let error_ptr = match CString::new(error) {
            Ok(cstring) => cstring.into_raw(),
            Err(_) => CString::new("Error message contains invalid characters")
                .expect("Hardcoded fallback string should be valid")
                .into_raw(),
        };

        Self {
            success: 0,
            data: std::ptr::null_mut(),
            error: error_ptr,
        }
    }

    /// Hands ownership to the caller; release with `free_api_result`.
    pub fn into_raw(self) -> *mut ApiResult {
        Box::into_raw(Box::new(self))
    }

    pub fn error_ptr(error: impl Into<String>) -> *mut ApiResult {
        Self::error(error.into()).into_raw()
    }

    pub fn from_result(result: Result<String, String>) -> *mut ApiResult {
        match result {
            Ok(data) => Self::success(data).into_raw(),
            Err(error) => Self::error(error).into_raw(),
        }
    }
}
