use std::sync::Arc;

use domain_concat::command::ConcatManyCommand;
use domain_concat::exception::ConcatException;
use domain_concat::mock::{MockObjectStoreService, MockProbeService};
use domain_concat::model::vo::{ObjectUrl, SourceMeta, MIN_PART_SIZE};
use domain_concat::service::{ObjectConcatService, ObjectStoreService, ProbeService};
use mockall::Sequence;
use service_concat::{MultipartSession, ObjectConcatServiceImpl};

fn url(key: &str) -> ObjectUrl {
    ObjectUrl::new("tub", key)
}

#[tokio::test]
async fn part_numbers_follow_call_order() {
    let destination = url("dest");
    let source = url("src");
    let mut store = MockObjectStoreService::new();
    let mut seq = Sequence::new();

    store
        .expect_create_multipart_upload()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok("uid-1".to_owned()));
    store
        .expect_upload_part_copy()
        .withf(|_, upload_id, part_number, _, _| upload_id == "uid-1" && *part_number == 1)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _, _| Ok("etag-1".to_owned()));
    store
        .expect_upload_part()
        .withf(|_, upload_id, part_number, _| upload_id == "uid-1" && *part_number == 2)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| Ok("etag-2".to_owned()));
    store
        .expect_complete_multipart_upload()
        .withf(|_, upload_id, parts| {
            upload_id == "uid-1"
                && *parts == [(1, "etag-1".to_owned()), (2, "etag-2".to_owned())]
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));

    let store: Arc<dyn ObjectStoreService> = Arc::new(store);
    let mut session = MultipartSession::begin(store, destination).await.unwrap();
    session.add_copy_part(&source, None).await.unwrap();
    session.add_buffer_part(b"tail".to_vec()).await.unwrap();
    session.complete().await.unwrap();
}

#[tokio::test]
async fn abort_failure_never_masks_the_original_error() {
    let destination = url("dest");
    let source = url("src");

    let mut probe_service = MockProbeService::new();
    let probed = vec![SourceMeta {
        url: source.clone(),
        size: 2 * MIN_PART_SIZE,
        exists: true,
    }];
    probe_service.expect_probe().times(1).return_once(move |_| Ok(probed));

    let mut store = MockObjectStoreService::new();
    store
        .expect_create_multipart_upload()
        .times(1)
        .returning(|_| Ok("uid-9".to_owned()));
    store
        .expect_upload_part_copy()
        .times(1)
        .returning(|_, _, _, _, _| Err(anyhow::anyhow!("boom")));
    // The abort itself fails too; only the original error may surface.
    store
        .expect_abort_multipart_upload()
        .withf(|_, upload_id| upload_id == "uid-9")
        .times(1)
        .returning(|_, _| Err(anyhow::anyhow!("abort exploded")));
    store.expect_complete_multipart_upload().times(0);

    let service = ObjectConcatServiceImpl::builder()
        .store(Arc::new(store) as Arc<dyn ObjectStoreService>)
        .probe_service(Arc::new(probe_service) as Arc<dyn ProbeService>)
        .build();

    let err = service
        .concat_many(ConcatManyCommand {
            urls: vec![destination, source],
            remove_originals: false,
        })
        .await
        .unwrap_err();

    match err {
        ConcatException::InternalError { source } => {
            assert_eq!("boom", source.to_string());
        }
        other => panic!("expected the original error, got {other:?}"),
    }
}
