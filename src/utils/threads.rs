use futures::StreamExt;
use futures::stream;

/// 以受限并发度执行一组Future并收集全部结果
///
/// 结果按完成顺序返回，调用方如需确定顺序应在结果中自带标识。
/// 协作式调度，单任务内并发轮询，不产生真正的并行。
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, max_parallels: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    stream::iter(futures)
        .buffer_unordered(max_parallels.max(1))
        .collect()
        .await
}
