//! C ABI for hosting the track generator from another runtime.
//!
//! Functions:
//! - `track_create` / `track_load` / `track_free` - own a built track behind a handle
//! - `track_build` - copy a handle's geometry into caller buffers
//! - `track_sample` / `track_current_lap` - query a handle
//! - `track_save_size` / `track_save` - serialize points and config to TRKD bytes
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-2`: Invalid input
//! - `-3`: Buffer too small (resize and retry)
//! - `-4`: Distance out of range
//! - `-5`: Invalid format

use crate::config::TrackConfig;
use crate::geom::Float3;
use crate::persistence::{self, TrackDocument};
use crate::track::{TrackError, TrackGenerator, TrackVertex};

pub const TRACK_OK: i32 = 0;
pub const TRACK_NULL_POINTER: i32 = -1;
pub const TRACK_INVALID_INPUT: i32 = -2;
pub const TRACK_BUFFER_TOO_SMALL: i32 = -3;
pub const TRACK_OUT_OF_RANGE: i32 = -4;
pub const TRACK_INVALID_FORMAT: i32 = -5;

/// C layout of [`TrackConfig`].
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TrackParams {
    pub sample_count: u32,
    pub track_width: f32,
    pub world_up: Float3,
    pub texture_repeat_length: f32,
}

impl From<TrackParams> for TrackConfig {
    fn from(params: TrackParams) -> Self {
        Self {
            sample_count: params.sample_count as usize,
            track_width: params.track_width,
            world_up: params.world_up,
            texture_repeat_length: params.texture_repeat_length,
        }
    }
}

/// Control polygon and build parameters.
#[repr(C)]
pub struct TrackInput {
    pub control_points: *const Float3,
    pub control_count: usize,
    /// May be null when `up_count` is 0.
    pub up_vectors: *const Float3,
    pub up_count: usize,
    pub params: TrackParams,
}

/// Caller-owned buffers receiving built geometry.
#[repr(C)]
pub struct TrackOutput {
    pub centreline: *mut Float3,
    pub centreline_capacity: usize,

    pub left_rail: *mut Float3,
    pub right_rail: *mut Float3,
    pub rail_capacity: usize,

    pub vertices: *mut TrackVertex,
    pub vertex_capacity: usize,

    // Written by track_build, also on -3 so the caller can resize
    pub centreline_count: *mut usize,
    pub rail_count: *mut usize,
    pub vertex_count: *mut usize,
    pub total_length: *mut f32,
}

/// Result of `track_sample`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackSample {
    pub position: Float3,
    pub up: Float3,
    /// 1 when `up` is meaningful.
    pub has_up: u8,
}

/// Opaque handle to a built track.
pub type TrackHandle = *mut std::ffi::c_void;

fn error_code(err: &TrackError) -> i32 {
    match err {
        TrackError::InvalidInput(_) | TrackError::InconsistentState(_) => TRACK_INVALID_INPUT,
        TrackError::OutOfRange { .. } | TrackError::SegmentNotFound { .. } => TRACK_OUT_OF_RANGE,
    }
}

/// Build a track from control points and return a handle to it.
///
/// # Safety
/// - `input` must point to a valid `TrackInput` whose arrays hold their counts
/// - `handle_out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn track_create(
    input: *const TrackInput,
    handle_out: *mut TrackHandle,
) -> i32 {
    if input.is_null() || handle_out.is_null() {
        return TRACK_NULL_POINTER;
    }
    let input = &*input;
    if has_missing_arrays(input) {
        return TRACK_NULL_POINTER;
    }

    let config = TrackConfig::from(input.params);
    match TrackGenerator::from_config(
        to_vec(input.control_points, input.control_count),
        to_vec(input.up_vectors, input.up_count),
        &config,
    ) {
        Ok(track) => {
            *handle_out = Box::into_raw(Box::new(track)) as TrackHandle;
            TRACK_OK
        }
        Err(err) => {
            log::warn!("track_create failed: {err}");
            error_code(&err)
        }
    }
}

/// Load a TRKD buffer and build the track it describes.
///
/// # Safety
/// - `data` must point to a valid buffer of at least `data_len` bytes
/// - `handle_out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn track_load(
    data: *const u8,
    data_len: usize,
    handle_out: *mut TrackHandle,
) -> i32 {
    if data.is_null() || handle_out.is_null() {
        return TRACK_NULL_POINTER;
    }

    let bytes = std::slice::from_raw_parts(data, data_len);
    let doc = match persistence::deserialize(bytes) {
        Ok(doc) => doc,
        Err(err) => {
            log::warn!("track_load failed: {err}");
            return TRACK_INVALID_FORMAT;
        }
    };
    match doc.to_generator() {
        Ok(track) => {
            *handle_out = Box::into_raw(Box::new(track)) as TrackHandle;
            TRACK_OK
        }
        Err(err) => error_code(&err),
    }
}

/// Free a track handle.
///
/// # Safety
/// - `handle` must be a handle returned by `track_create` or `track_load`, or null
#[no_mangle]
pub unsafe extern "C" fn track_free(handle: TrackHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut TrackGenerator));
    }
}

/// Copy the centreline, both rails and the strip vertices into `output`.
///
/// # Safety
/// - `handle` must be a live handle
/// - `output` must be a valid pointer; its count pointers must be valid and
///   its buffers must hold at least their `*_capacity` elements
#[no_mangle]
pub unsafe extern "C" fn track_build(handle: TrackHandle, output: *mut TrackOutput) -> i32 {
    if handle.is_null() || output.is_null() {
        return TRACK_NULL_POINTER;
    }
    let track = &*(handle as *const TrackGenerator);
    let output = &mut *output;
    if output.centreline_count.is_null()
        || output.rail_count.is_null()
        || output.vertex_count.is_null()
        || output.total_length.is_null()
    {
        return TRACK_NULL_POINTER;
    }

    let centreline = track.centreline();
    let left = track.left_offset_points();
    let right = track.right_offset_points();
    let vertices = track.track_vertices();

    *output.centreline_count = centreline.len();
    *output.rail_count = left.len();
    *output.vertex_count = vertices.len();
    *output.total_length = track.total_length();

    if centreline.len() > output.centreline_capacity
        || left.len() > output.rail_capacity
        || vertices.len() > output.vertex_capacity
    {
        return TRACK_BUFFER_TOO_SMALL;
    }

    let code = copy_out(centreline, output.centreline);
    if code != TRACK_OK {
        return code;
    }
    let code = copy_out(left, output.left_rail);
    if code != TRACK_OK {
        return code;
    }
    let code = copy_out(right, output.right_rail);
    if code != TRACK_OK {
        return code;
    }
    copy_out(vertices, output.vertices)
}

/// Sample the track at arc length `distance`, wrapping around the loop.
///
/// # Safety
/// - `handle` must be a live handle
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn track_sample(
    handle: TrackHandle,
    distance: f32,
    out: *mut TrackSample,
) -> i32 {
    if handle.is_null() || out.is_null() {
        return TRACK_NULL_POINTER;
    }
    let track = &*(handle as *const TrackGenerator);

    match track.sample(distance) {
        Ok(point) => {
            *out = TrackSample {
                position: point.position,
                up: point.up.unwrap_or(Float3::ZERO),
                has_up: u8::from(point.up.is_some()),
            };
            TRACK_OK
        }
        Err(err) => error_code(&err),
    }
}

/// Completed laps at `distance`.
///
/// # Safety
/// - `handle` must be a live handle
/// - `lap_out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn track_current_lap(
    handle: TrackHandle,
    distance: f32,
    lap_out: *mut u32,
) -> i32 {
    if handle.is_null() || lap_out.is_null() {
        return TRACK_NULL_POINTER;
    }
    let track = &*(handle as *const TrackGenerator);

    match track.current_lap(distance) {
        Ok(lap) => {
            *lap_out = lap;
            TRACK_OK
        }
        Err(err) => error_code(&err),
    }
}

/// Buffer size required to serialize `input`, or a negative error code.
///
/// # Safety
/// - `input` must point to a valid `TrackInput` whose arrays hold their counts
#[no_mangle]
pub unsafe extern "C" fn track_save_size(input: *const TrackInput) -> i64 {
    if input.is_null() || has_missing_arrays(&*input) {
        return TRACK_NULL_POINTER as i64;
    }
    persistence::serialize(&input_to_document(&*input)).len() as i64
}

/// Serialize `input` to a byte buffer.
///
/// # Returns
/// - `0` on success
/// - `-1` on null pointer
/// - `-3` if buffer too small (`bytes_written` holds the required size)
///
/// # Safety
/// - `input` must point to a valid `TrackInput` whose arrays hold their counts
/// - `buffer` must point to at least `buffer_capacity` writable bytes
/// - `bytes_written` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn track_save(
    input: *const TrackInput,
    buffer: *mut u8,
    buffer_capacity: usize,
    bytes_written: *mut usize,
) -> i32 {
    if input.is_null() || buffer.is_null() || bytes_written.is_null() {
        return TRACK_NULL_POINTER;
    }
    if has_missing_arrays(&*input) {
        return TRACK_NULL_POINTER;
    }

    let serialized = persistence::serialize(&input_to_document(&*input));
    *bytes_written = serialized.len();
    if serialized.len() > buffer_capacity {
        return TRACK_BUFFER_TOO_SMALL;
    }

    std::ptr::copy_nonoverlapping(serialized.as_ptr(), buffer, serialized.len());
    TRACK_OK
}

// --- Helpers ---

/// A non-zero count paired with a null array.
fn has_missing_arrays(input: &TrackInput) -> bool {
    (input.control_count > 0 && input.control_points.is_null())
        || (input.up_count > 0 && input.up_vectors.is_null())
}

unsafe fn to_vec<T: Copy>(ptr: *const T, len: usize) -> Vec<T> {
    if len == 0 || ptr.is_null() {
        Vec::new()
    } else {
        std::slice::from_raw_parts(ptr, len).to_vec()
    }
}

unsafe fn copy_out<T: Copy>(src: &[T], dst: *mut T) -> i32 {
    if src.is_empty() {
        return TRACK_OK;
    }
    if dst.is_null() {
        return TRACK_NULL_POINTER;
    }
    std::ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
    TRACK_OK
}

unsafe fn input_to_document(input: &TrackInput) -> TrackDocument {
    TrackDocument::new(
        to_vec(input.control_points, input.control_count),
        to_vec(input.up_vectors, input.up_count),
        TrackConfig::from(input.params),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::presets;
    use std::ptr;

    fn params(sample_count: u32) -> TrackParams {
        TrackParams {
            sample_count,
            track_width: 100.0,
            world_up: Float3::UP,
            texture_repeat_length: 100.0,
        }
    }

    fn input(points: &[Float3], sample_count: u32) -> TrackInput {
        TrackInput {
            control_points: points.as_ptr(),
            control_count: points.len(),
            up_vectors: ptr::null(),
            up_count: 0,
            params: params(sample_count),
        }
    }

    fn create(points: &[Float3], sample_count: u32) -> TrackHandle {
        let mut handle: TrackHandle = ptr::null_mut();
        let code = unsafe { track_create(&input(points, sample_count), &mut handle) };
        assert_eq!(code, TRACK_OK);
        handle
    }

    #[test]
    fn build_copies_geometry() {
        let points = presets::default_circuit();
        let handle = create(&points, 50);

        let mut centreline = vec![Float3::ZERO; 50];
        let mut left = vec![Float3::ZERO; 49];
        let mut right = vec![Float3::ZERO; 49];
        let mut vertices = vec![TrackVertex::plain(Float3::ZERO, Float3::UP); 98];
        let (mut nc, mut nr, mut nv, mut total) = (0usize, 0usize, 0usize, 0.0f32);
        let mut output = TrackOutput {
            centreline: centreline.as_mut_ptr(),
            centreline_capacity: centreline.len(),
            left_rail: left.as_mut_ptr(),
            right_rail: right.as_mut_ptr(),
            rail_capacity: left.len(),
            vertices: vertices.as_mut_ptr(),
            vertex_capacity: vertices.len(),
            centreline_count: &mut nc,
            rail_count: &mut nr,
            vertex_count: &mut nv,
            total_length: &mut total,
        };

        unsafe {
            assert_eq!(track_build(handle, &mut output), TRACK_OK);
            let track = &*(handle as *const TrackGenerator);
            assert_eq!(centreline, track.centreline());
            assert_eq!(right, track.right_offset_points());
            assert_eq!(vertices, track.track_vertices());
            track_free(handle);
        }
        assert_eq!((nc, nr, nv), (50, 49, 98));
        assert!(total > 0.0);
    }

    #[test]
    fn small_buffers_report_required_counts() {
        let points = presets::default_circuit();
        let handle = create(&points, 40);

        let mut centreline = vec![Float3::ZERO; 10];
        let (mut nc, mut nr, mut nv, mut total) = (0usize, 0usize, 0usize, 0.0f32);
        let mut output = TrackOutput {
            centreline: centreline.as_mut_ptr(),
            centreline_capacity: centreline.len(),
            left_rail: ptr::null_mut(),
            right_rail: ptr::null_mut(),
            rail_capacity: 0,
            vertices: ptr::null_mut(),
            vertex_capacity: 0,
            centreline_count: &mut nc,
            rail_count: &mut nr,
            vertex_count: &mut nv,
            total_length: &mut total,
        };

        unsafe {
            assert_eq!(track_build(handle, &mut output), TRACK_BUFFER_TOO_SMALL);
            track_free(handle);
        }
        assert_eq!((nc, nr, nv), (40, 39, 78));
    }

    #[test]
    fn sample_and_lap_queries() {
        let points = presets::unit_square();
        let handle = create(&points, 40);

        unsafe {
            let track = &*(handle as *const TrackGenerator);
            let total = track.total_length();

            let mut sample = TrackSample::default();
            assert_eq!(track_sample(handle, 0.5, &mut sample), TRACK_OK);
            assert_eq!(sample.has_up, 0);
            assert_eq!(sample.position, track.sample(0.5).unwrap().position);
            assert_eq!(track_sample(handle, -1.0, &mut sample), TRACK_OUT_OF_RANGE);

            let mut lap = 0u32;
            assert_eq!(track_current_lap(handle, total * 2.5, &mut lap), TRACK_OK);
            assert_eq!(lap, 2);
            track_free(handle);
        }
    }

    #[test]
    fn invalid_inputs() {
        let mut handle: TrackHandle = ptr::null_mut();
        unsafe {
            assert_eq!(track_create(ptr::null(), &mut handle), TRACK_NULL_POINTER);
            assert_eq!(track_create(&input(&[], 10), &mut handle), TRACK_INVALID_INPUT);

            let points = presets::unit_square();
            assert_eq!(track_create(&input(&points, 0), &mut handle), TRACK_INVALID_INPUT);
        }
        assert!(handle.is_null());
    }

    #[test]
    fn null_arrays_with_counts_rejected() {
        let points = presets::unit_square();
        let mut missing_ups = input(&points, 10);
        missing_ups.up_count = points.len();

        let mut handle: TrackHandle = ptr::null_mut();
        let mut buffer = vec![0u8; 1024];
        let mut written = 0usize;
        unsafe {
            assert_eq!(track_create(&missing_ups, &mut handle), TRACK_NULL_POINTER);
            assert_eq!(track_save_size(&missing_ups), TRACK_NULL_POINTER as i64);
            assert_eq!(
                track_save(&missing_ups, buffer.as_mut_ptr(), buffer.len(), &mut written),
                TRACK_NULL_POINTER
            );

            let mut missing_points = input(&points, 10);
            missing_points.control_points = ptr::null();
            assert_eq!(track_create(&missing_points, &mut handle), TRACK_NULL_POINTER);
        }
        assert!(handle.is_null());
        assert_eq!(written, 0);
    }

    #[test]
    fn save_then_load() {
        let points = presets::default_circuit();
        let input = input(&points, 60);

        unsafe {
            let size = track_save_size(&input);
            assert!(size > 0);

            let mut small = vec![0u8; 4];
            let mut written = 0usize;
            assert_eq!(
                track_save(&input, small.as_mut_ptr(), small.len(), &mut written),
                TRACK_BUFFER_TOO_SMALL
            );
            assert_eq!(written as i64, size);

            let mut buffer = vec![0u8; written];
            assert_eq!(
                track_save(&input, buffer.as_mut_ptr(), buffer.len(), &mut written),
                TRACK_OK
            );

            let mut handle: TrackHandle = ptr::null_mut();
            assert_eq!(track_load(buffer.as_ptr(), buffer.len(), &mut handle), TRACK_OK);
            let track = &*(handle as *const TrackGenerator);
            assert_eq!(track.centreline().len(), 60);
            track_free(handle);

            buffer[0] = 0;
            assert_eq!(
                track_load(buffer.as_ptr(), buffer.len(), &mut handle),
                TRACK_INVALID_FORMAT
            );
        }
    }
}
