use super::*;

#[test]
fn reset_collapses_interval_onto_frame() {
    let params = ShiftParameters::reset_at(FrameType::Position, 50);
    assert_eq!(params.start, 50);
    assert_eq!(params.end, 50);
    assert_eq!(params.displacement, 0);
    assert_eq!(params.frame_type, FrameType::Position);
}

#[test]
fn frame_type_parses_ui_tags_case_insensitively() {
    assert_eq!("CONTROL".parse::<FrameType>().expect("control"), FrameType::Control);
    assert_eq!(" position ".parse::<FrameType>().expect("position"), FrameType::Position);
    assert_eq!("Both".parse::<FrameType>().expect("both"), FrameType::Both);
}

#[test]
fn unknown_frame_type_is_rejected() {
    let err = "dancer".parse::<FrameType>().expect_err("unknown tag");
    assert!(matches!(err, ShiftError::InvalidParameters(_)));
    assert!(err.to_string().contains("dancer"));
}

#[test]
fn reversed_interval_still_validates() {
    let params = ShiftParameters {
        frame_type: FrameType::Control,
        start: 80,
        end: 20,
        displacement: -5,
    };
    params.validate().expect("reversed interval is allowed");
}

#[test]
fn negative_frames_fail_validation() {
    let mut params = ShiftParameters::reset_at(FrameType::Control, 0);
    params.start = -1;
    assert!(params.validate().is_err());

    params.start = 0;
    params.end = -3;
    let err = params.validate().expect_err("negative end");
    assert!(err.to_string().contains("end frame"));
}

#[test]
fn request_is_built_from_parameters_by_value() {
    let mut params = ShiftParameters::reset_at(FrameType::Both, 10);
    params.end = 30;
    params.displacement = 7;
    let request = ShiftRequest::from(params);

    params.displacement = 99;

    assert_eq!(request.interval, (10, 30));
    assert_eq!(request.displacement, 7);
    assert_eq!(request.frame_type, FrameType::Both);
}

#[test]
fn failure_message_is_prefixed_for_users() {
    let err = ShiftError::Rejected("out of range".into());
    assert_eq!(err.user_message(), "Time shift failed: out of range");
    assert!(!err.is_transport());

    let err = ShiftError::transport(anyhow::anyhow!("connection refused"));
    assert_eq!(err.user_message(), "Time shift failed: connection refused");
    assert!(err.is_transport());
}
