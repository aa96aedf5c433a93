use restaurant_ordering_api::{
    domain::status::{OrderStatus, StatusError, progress_steps},
    error::AppError,
};

#[test]
fn orders_move_forward_one_step_at_a_time() {
    assert_eq!(
        OrderStatus::New.transition(OrderStatus::Preparing),
        Ok(OrderStatus::Preparing)
    );
    assert_eq!(
        OrderStatus::Preparing.transition(OrderStatus::Ready),
        Ok(OrderStatus::Ready)
    );
}

#[test]
fn backward_skipping_and_repeated_moves_are_rejected() {
    for (from, to) in [
        (OrderStatus::Ready, OrderStatus::Preparing),
        (OrderStatus::Preparing, OrderStatus::New),
        (OrderStatus::New, OrderStatus::Ready),
        (OrderStatus::New, OrderStatus::New),
        (OrderStatus::Ready, OrderStatus::Ready),
    ] {
        assert_eq!(
            from.transition(to),
            Err(StatusError::InvalidTransition { from, to }),
            "{from} -> {to}"
        );
    }
}

#[test]
fn invalid_transition_maps_to_conflict() {
    let err: AppError = OrderStatus::Ready
        .transition(OrderStatus::Preparing)
        .unwrap_err()
        .into();
    assert!(matches!(err, AppError::Conflict(_)));

    let err: AppError = "delivered".parse::<OrderStatus>().unwrap_err().into();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[test]
fn each_status_offers_one_action() {
    assert_eq!(OrderStatus::New.next_action(), Some("start preparing"));
    assert_eq!(OrderStatus::Preparing.next_action(), Some("mark ready"));
    assert_eq!(OrderStatus::Ready.next_action(), None);
    assert_eq!(OrderStatus::Ready.next(), None);
}

#[test]
fn statuses_round_trip_through_their_names() {
    for status in OrderStatus::ALL {
        assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
    }
    assert_eq!(
        serde_json::to_string(&OrderStatus::Preparing).unwrap(),
        "\"preparing\""
    );
}

#[test]
fn progress_line_lights_up_reached_steps() {
    let active: Vec<bool> = progress_steps(OrderStatus::Preparing)
        .iter()
        .map(|step| step.active)
        .collect();
    assert_eq!(active, vec![true, true, false]);

    let steps = progress_steps(OrderStatus::New);
    assert_eq!(steps[0].label, "New");
    assert!(steps[0].active);
    assert!(!steps[2].active);
}
