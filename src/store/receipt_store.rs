use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// 小票积分存储 (进程内, 重启即丢失)
///
/// 每次 put/get 只在对应分片锁内完成一次 map 操作.
#[derive(Debug, Default)]
pub struct ReceiptStore {
    points: DashMap<String, i64>,
}

impl ReceiptStore {
    pub fn new() -> Self {
        Self {
            points: DashMap::new(),
        }
    }

    /// 生成新的小票ID并保存积分, 返回该ID
    pub fn put(&self, points: i64) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if let Entry::Vacant(slot) = self.points.entry(id.clone()) {
                slot.insert(points);
                return id;
            }
        }
    }

    /// 按ID查询积分
    pub fn get(&self, id: &str) -> Option<i64> {
        self.points.get(id).map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn put_then_get() {
        let store = ReceiptStore::new();
        assert!(store.is_empty());
        let id = store.put(28);
        assert_eq!(id.len(), 36);
        assert_eq!(store.get(&id), Some(28));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_id_is_missing() {
        let store = ReceiptStore::new();
        store.put(1);
        assert_eq!(store.get("7fb1377b-b223-49d9-a31a-5a02701dd310"), None);
        assert_eq!(store.get(""), None);
    }

    #[test]
    fn concurrent_puts_keep_every_entry() {
        let store = Arc::new(ReceiptStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|i| {
                            let points = t * 1000 + i;
                            (store.put(points), points)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for (id, points) in handle.join().unwrap() {
                assert_eq!(store.get(&id), Some(points));
                ids.insert(id);
            }
        }
        assert_eq!(ids.len(), 800);
        assert_eq!(store.len(), 800);
    }
}
