//! Memory allocation utilities for FFI functions.
//!
//! Output arrays are allocated with `malloc` so C callers may release them
//! with the matching `knn_fcst_free_*` function.

use core::ffi::c_double;
use libc::{free, malloc};
use std::ptr;

/// Copy a Rust slice to a newly allocated C array.
///
/// # Safety
/// Returns null on allocation failure or if slice is empty.
pub unsafe fn slice_to_c_array<T: Copy>(slice: &[T]) -> *mut T {
    if slice.is_empty() {
        return ptr::null_mut();
    }

    let ptr = malloc(std::mem::size_of_val(slice)) as *mut T;
    if !ptr.is_null() {
        ptr::copy_nonoverlapping(slice.as_ptr(), ptr, slice.len());
    }
    ptr
}

/// Copy a `&[f64]` to a newly allocated C double array.
///
/// # Safety
/// Returns null on allocation failure or if the slice is empty.
#[inline]
pub unsafe fn vec_to_c_double_array(vec: &[f64]) -> *mut c_double {
    slice_to_c_array(vec)
}

/// Free a pointer obtained from `malloc`.
///
/// # Safety
/// ptr must be either null or a valid pointer allocated by malloc.
#[inline]
pub unsafe fn free_ptr(ptr: *mut core::ffi::c_void) {
    if !ptr.is_null() {
        free(ptr);
    }
}

/// Macro to free multiple struct fields.
///
/// Usage:
/// ```ignore
/// free_fields!(result, field1, field2, field3);
/// ```
#[macro_export]
macro_rules! free_fields {
    ($result:expr, $($field:ident),+ $(,)?) => {{
        $(
            if !$result.$field.is_null() {
                $crate::allocation::free_ptr($result.$field as *mut core::ffi::c_void);
                $result.$field = std::ptr::null_mut();
            }
        )+
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slice_is_null() {
        unsafe {
            let empty: [f64; 0] = [];
            assert!(vec_to_c_double_array(&empty).is_null());
        }
    }

    #[test]
    fn test_vec_to_c_double_array() {
        unsafe {
            let vec = vec![1.0, 2.0, 3.0];
            let ptr = vec_to_c_double_array(&vec);
            assert!(!ptr.is_null());

            assert_eq!(*ptr, 1.0);
            assert_eq!(*ptr.add(1), 2.0);
            assert_eq!(*ptr.add(2), 3.0);

            free_ptr(ptr as *mut core::ffi::c_void);
        }
    }

    #[test]
    fn test_slice_to_c_array_usize() {
        unsafe {
            let idx: [usize; 3] = [6, 7, 4];
            let ptr = slice_to_c_array(&idx);
            assert_eq!(std::slice::from_raw_parts(ptr, 3), &idx);
            free_ptr(ptr as *mut core::ffi::c_void);
        }
    }
}
